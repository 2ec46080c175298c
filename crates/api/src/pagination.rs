use database::TxPageParams;
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

pub fn page_size(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// `next` is the offset of the following page, or `None` past the last one.
pub fn next_offset(count: u64, offset: u64, limit: u64) -> Option<u64> {
    (count > (offset + 1) * limit).then_some(offset + 1)
}

/// Query string of the transfer listings.
#[derive(Debug, Clone, Deserialize)]
pub struct TxPageQuery {
    pub bridge_id: Option<i64>,
    pub sequence: Option<i64>,
    pub address: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub descending: Option<bool>,
}

impl TxPageQuery {
    pub fn to_params(&self) -> TxPageParams {
        TxPageParams {
            bridge_id: self.bridge_id,
            sequence: self.sequence,
            address: self.address.clone(),
            offset: self.offset.unwrap_or(0),
            limit: page_size(self.limit),
            descending: self.descending.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub descending: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_size() {
        assert_eq!(page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size(Some(0)), 1);
        assert_eq!(page_size(Some(10_000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn next_offset_stops_at_the_last_page() {
        // 45 rows, pages of 20: offsets 0 and 1 have a next page, 2 does not
        assert_eq!(next_offset(45, 0, 20), Some(1));
        assert_eq!(next_offset(45, 1, 20), Some(2));
        assert_eq!(next_offset(45, 2, 20), None);
        // exact multiple: the last full page has no next
        assert_eq!(next_offset(40, 1, 20), None);
    }
}
