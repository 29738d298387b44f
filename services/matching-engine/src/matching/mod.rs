//! The matching loop
//!
//! Walks the opposite book from its head, producing a trade per fill,
//! until the incoming order is exhausted or the head no longer crosses.

pub mod crossing;

use types::ids::{OrderId, Symbol, TradeId, UserId};
use types::numeric::{Price, Quantity};
use types::order::Side;

use crate::book::SymbolBook;
use crate::pubsub::EventHub;
use crate::recorder::{self, TradeLog};
use crate::sequence::SequenceAllocator;

/// Match an incoming order against the opposite side.
///
/// Returns the unfilled remainder (possibly zero) and the ids of the
/// trades produced, in execution order. The caller rests any remainder.
#[allow(clippy::too_many_arguments)]
pub(crate) fn match_incoming(
    book: &mut SymbolBook,
    seqs: &mut SequenceAllocator,
    trades: &mut TradeLog,
    hub: &EventHub,
    symbol: &Symbol,
    taker_order_id: &OrderId,
    taker_user_id: UserId,
    taker_side: Side,
    taker_limit: Price,
    qty: Quantity,
    now_ms: u64,
) -> (u64, Vec<TradeId>) {
    let mut remaining = qty.get();
    let mut trade_ids = Vec::new();
    let opposite = taker_side.opposite();

    while remaining > 0 {
        let Some((maker_id, maker_price)) = book.peek_best(opposite) else {
            break;
        };
        if !crossing::crosses(taker_side, taker_limit, maker_price) {
            break;
        }

        let maker = book.lookup(&maker_id);
        let maker_user_id = maker.user_id;
        let maker_qty = maker.qty.get();
        let fill = remaining.min(maker_qty);

        // Execution price is the maker's resting price.
        let trade_id = recorder::record_trade(
            trades,
            seqs,
            hub,
            symbol,
            maker_id.clone(),
            maker_user_id,
            taker_order_id.clone(),
            taker_user_id,
            maker_price,
            Quantity::new(fill),
            now_ms,
        );
        trade_ids.push(trade_id);

        if maker_qty > remaining {
            book.decrement_qty(&maker_id, Quantity::new(remaining));
            remaining = 0;
        } else {
            let removed = book.pop_best(opposite);
            assert_eq!(
                removed.order_id, maker_id,
                "head of book changed mid-fill"
            );
            remaining -= maker_qty;
        }
    }

    (remaining, trade_ids)
}
