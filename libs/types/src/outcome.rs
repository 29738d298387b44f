//! Submission outcomes and the reject taxonomy
//!
//! Every validation failure is a structured outcome, never a panic; the
//! caller's protocol layer can serialize an Outcome directly.

use crate::ids::{OrderId, TradeId};
use crate::numeric::Quantity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-visible reasons a submission is rejected without touching
/// engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("unrecognized order type")]
    InvalidOrderType,

    #[error("side must be \"buy\" or \"sell\"")]
    InvalidSide,

    #[error("price must be a positive integer")]
    InvalidPrice,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("market orders are not implemented")]
    NotImplemented,
}

/// Result of one order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Rejected by validation; no state was mutated.
    Error { error: RejectReason },
    /// No crossing occurred; the full quantity rested.
    Open { order_id: OrderId },
    /// Some fills, residual rested.
    Partial {
        order_id: OrderId,
        remaining_qty: Quantity,
        trade_ids: Vec<TradeId>,
    },
    /// Fully consumed by fills.
    Filled {
        order_id: OrderId,
        trade_ids: Vec<TradeId>,
    },
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    /// The assigned order id, if the submission was accepted.
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            Outcome::Error { .. } => None,
            Outcome::Open { order_id }
            | Outcome::Partial { order_id, .. }
            | Outcome::Filled { order_id, .. } => Some(order_id),
        }
    }

    /// Trades produced by this submission, in execution order.
    pub fn trade_ids(&self) -> &[TradeId] {
        match self {
            Outcome::Partial { trade_ids, .. } | Outcome::Filled { trade_ids, .. } => trade_ids,
            _ => &[],
        }
    }
}
