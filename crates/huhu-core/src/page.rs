use serde::Serialize;

/// A `limit`/`offset` window over the joke collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const DEFAULT_OFFSET: u64 = 0;

    /// Creates a window. A zero `limit` falls back to [`Page::DEFAULT_LIMIT`].
    pub fn new(limit: u32, offset: u64) -> Self {
        let limit = if limit == 0 { Self::DEFAULT_LIMIT } else { limit };
        Self { limit, offset }
    }

    /// Builds a window from raw query parameters.
    ///
    /// A `limit` that is not a positive integer, or an `offset` that is not a
    /// non-negative integer, keeps its default. Malformed input is never an error.
    pub fn from_params(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(Self::DEFAULT_LIMIT);
        let offset = offset
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_OFFSET);

        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(Page::from_params(None, None), Page::default());
    }

    #[test]
    fn parses_valid_params() {
        assert_eq!(
            Page::from_params(Some("5"), Some("10")),
            Page {
                limit: 5,
                offset: 10
            }
        );
    }

    #[test]
    fn invalid_params_keep_defaults() {
        let page = Page::from_params(Some("0"), Some("-1"));
        assert_eq!(page, Page::default());

        let page = Page::from_params(Some("-4"), Some("ten"));
        assert_eq!(page, Page::default());

        let page = Page::from_params(Some(""), Some("3"));
        assert_eq!(page.limit, Page::DEFAULT_LIMIT);
        assert_eq!(page.offset, 3);
    }

    #[test]
    fn zero_limit_is_replaced() {
        assert_eq!(Page::new(0, 4).limit, Page::DEFAULT_LIMIT);
    }
}
