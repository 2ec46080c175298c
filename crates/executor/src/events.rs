use alloy_primitives::U256;

use crate::{chain::ChainEvent, error::ExecutorError};

pub const INITIATE_TOKEN_WITHDRAWAL: &str = "initiate_token_withdrawal";

/// Decoded `initiate_token_withdrawal` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalEvent {
    pub l2_denom: String,
    pub sequence: u64,
    pub sender: String,
    pub receiver: String,
    pub amount: U256,
}

/// Maps a raw chain event to a withdrawal intent. Events of any other type
/// yield `None`; a matching event with missing or malformed attributes is an
/// error, so the height aborts instead of dropping the withdrawal.
pub fn decode_withdrawal_event(
    event: &ChainEvent,
) -> Result<Option<WithdrawalEvent>, ExecutorError> {
    if event.kind != INITIATE_TOKEN_WITHDRAWAL {
        return Ok(None);
    }

    let sequence = required_attr(event, "l2_sequence")?
        .parse::<u64>()
        .map_err(|e| ExecutorError::decode("withdrawal event sequence", e))?;
    let raw_amount = required_attr(event, "amount")?;
    let amount = raw_amount
        .parse::<U256>()
        .map_err(|_| ExecutorError::InvalidAmount(raw_amount.to_owned()))?;
    if amount.is_zero() {
        return Err(ExecutorError::InvalidAmount(raw_amount.to_owned()));
    }

    Ok(Some(WithdrawalEvent {
        l2_denom: required_attr(event, "denom")?.to_owned(),
        sequence,
        sender: required_attr(event, "from")?.to_owned(),
        receiver: required_attr(event, "to")?.to_owned(),
        amount,
    }))
}

fn required_attr<'a>(event: &'a ChainEvent, key: &'static str) -> Result<&'a str, ExecutorError> {
    event
        .attr(key)
        .ok_or_else(|| ExecutorError::decode("withdrawal event", format!("missing '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn withdrawal_event(amount: &str) -> ChainEvent {
        ChainEvent {
            kind: INITIATE_TOKEN_WITHDRAWAL.to_owned(),
            attributes: vec![
                ("denom".to_owned(), "uusdc".to_owned()),
                ("l2_sequence".to_owned(), "1".to_owned()),
                ("from".to_owned(), "a".to_owned()),
                ("to".to_owned(), "b".to_owned()),
                ("amount".to_owned(), amount.to_owned()),
            ],
        }
    }

    #[test]
    fn decodes_withdrawal_initiation() {
        let decoded = decode_withdrawal_event(&withdrawal_event("1000"))
            .unwrap()
            .unwrap();
        assert_eq!(
            decoded,
            WithdrawalEvent {
                l2_denom: "uusdc".to_owned(),
                sequence: 1,
                sender: "a".to_owned(),
                receiver: "b".to_owned(),
                amount: U256::from(1000u64),
            }
        );
    }

    #[test]
    fn ignores_foreign_event_types() {
        let event = ChainEvent {
            kind: "coin_spent".to_owned(),
            attributes: vec![("amount".to_owned(), "5".to_owned())],
        };
        assert!(decode_withdrawal_event(&event).unwrap().is_none());
    }

    #[test]
    fn rejects_zero_amount() {
        let err = decode_withdrawal_event(&withdrawal_event("0")).unwrap_err();
        assert!(matches!(err, ExecutorError::InvalidAmount(_)));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let err = decode_withdrawal_event(&withdrawal_event("12abc")).unwrap_err();
        assert!(matches!(err, ExecutorError::InvalidAmount(_)));
    }

    #[test]
    fn missing_attribute_is_a_decode_error() {
        let mut event = withdrawal_event("1000");
        event.attributes.retain(|(k, _)| k != "to");
        let err = decode_withdrawal_event(&event).unwrap_err();
        assert!(matches!(err, ExecutorError::Decode { .. }));
    }
}
