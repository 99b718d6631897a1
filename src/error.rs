use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error compiling regex {pattern}: {source}")]
    Filter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid master url {url:?}: {source}")]
    MasterUrl {
        url: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("error loading kubeconfig {path:?}: {source}")]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("error inferring cluster config: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    #[error("error building client for {host}: {source}")]
    Client {
        host: String,
        #[source]
        source: kube::Error,
    },

    #[error("error listing {collection}: {source}")]
    List {
        collection: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("error writing data: {0}")]
    Output(#[from] std::io::Error),

    #[error("interrupted by {0}")]
    Interrupted(&'static str),
}

impl Error {
    pub(crate) fn list(collection: &'static str) -> impl FnOnce(kube::Error) -> Self {
        move |source| Error::List { collection, source }
    }
}
