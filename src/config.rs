use crate::{
    error::{
        Error,
        Result,
    },
    filter::NameFilter,
};
use clap::Parser;
use http::Uri;
use std::path::PathBuf;

pub const DEFAULT_MASTER_URL: &str = "https://localhost:8443";

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    #[clap(
        long,
        help = "Path to the kubeconfig file. Defaults to ~/.kube/config if it exists, pass an empty value to skip it"
    )]
    pub kubeconfig: Option<String>,

    #[clap(
        long = "master-url",
        alias = "master_url",
        env = "KUBE_MASTER_URL",
        help = "Control plane url, overrides the server of the kubeconfig. Empty keeps the kubeconfig server",
        default_value = DEFAULT_MASTER_URL
    )]
    pub master_url: String,

    #[clap(
        short,
        long,
        env = "NAMESPACE",
        help = "Namespace to list pods and services from. Empty lists all namespaces",
        default_value = ""
    )]
    pub namespace: String,

    #[clap(long, help = "Regex to filter pods and services by name", default_value = "")]
    pub grep: String,
}

impl Args {
    pub fn name_filter(&self) -> Result<NameFilter> {
        NameFilter::new(&self.grep)
    }

    /// An explicit `--kubeconfig` is used as is, the default location only when the file exists.
    pub fn kubeconfig_path(&self) -> Option<PathBuf> {
        match &self.kubeconfig {
            Some(path) if path.is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::home_dir()
                .map(|home| home.join(".kube").join("config"))
                .filter(|path| path.exists()),
        }
    }

    pub fn master_url(&self) -> Result<Option<Uri>> {
        if self.master_url.is_empty() {
            return Ok(None);
        }
        self.master_url
            .parse::<Uri>()
            .map(Some)
            .map_err(|source| Error::MasterUrl {
                url: self.master_url.clone(),
                source,
            })
    }
}
