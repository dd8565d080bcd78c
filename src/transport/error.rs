use super::Category;

/// Failure fetching a single stop.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The provider answered with an error code other than success or no-data.
    #[error("provider error {code}: {message}")]
    ProviderFault { code: String, message: String },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Failure aggregating a whole service category.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("unknown service category '{0}', expected BUS or LUAS")]
    UnknownCategory(String),
    #[error("{category} stop '{stop}' reported provider error {code}: {message}")]
    ProviderFault {
        category: Category,
        stop: String,
        code: String,
        message: String,
    },
    #[error("{category} stop '{stop}' could not be fetched")]
    Fetch {
        category: Category,
        stop: String,
        #[source]
        source: FetchError,
    },
}
