use serde::Serialize;

/// Body of `POST /{nfe|nfce}/{id}/cancelamento`
#[derive(Debug, Clone, Serialize)]
pub struct CancellationRequest<'a> {
    #[serde(rename = "justificativa")]
    pub justification: &'a str,
}

/// Body of `POST /nfe/{id}/cce`
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionRequest<'a> {
    #[serde(rename = "correcao")]
    pub correction: &'a str,
}

/// Query parameters of a call.
///
/// Pairs with an empty name or an empty value are dropped when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    /// Pairs that will actually be sent
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
