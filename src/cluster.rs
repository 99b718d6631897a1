use crate::{
    config::Args,
    error::{
        Error,
        Result,
    },
    snapshot::{
        NodeInfo,
        PodInfo,
        ServiceInfo,
    },
};
use k8s_openapi::{
    api::core::v1::{
        Node,
        Pod,
        Service,
    },
    NamespaceResourceScope,
};
use kube::{
    api::ListParams,
    config::{
        Kubeconfig,
        KubeConfigOptions,
    },
    Api,
    Config,
    Resource,
};

/// Point-in-time listings of the objects a report needs.
///
/// An empty namespace lists across all namespaces.
#[allow(async_fn_in_trait)]
pub trait ClusterApi {
    async fn list_nodes(&self) -> kube::Result<Vec<NodeInfo>>;
    async fn list_pods(&self, namespace: &str) -> kube::Result<Vec<PodInfo>>;
    async fn list_services(&self, namespace: &str) -> kube::Result<Vec<ServiceInfo>>;
}

impl ClusterApi for kube::Client {
    async fn list_nodes(&self) -> kube::Result<Vec<NodeInfo>> {
        let nodes = Api::<Node>::all(self.clone()).list(&ListParams::default()).await?;
        debug!("listed {} nodes", nodes.items.len());
        Ok(nodes.items.iter().map(NodeInfo::from).collect())
    }

    async fn list_pods(&self, namespace: &str) -> kube::Result<Vec<PodInfo>> {
        let pods = scoped::<Pod>(self, namespace).list(&ListParams::default()).await?;
        debug!(%namespace, "listed {} pods", pods.items.len());
        Ok(pods.items.iter().map(PodInfo::from).collect())
    }

    async fn list_services(&self, namespace: &str) -> kube::Result<Vec<ServiceInfo>> {
        let services = scoped::<Service>(self, namespace)
            .list(&ListParams::default())
            .await?;
        debug!(%namespace, "listed {} services", services.items.len());
        Ok(services.items.iter().map(ServiceInfo::from).collect())
    }
}

fn scoped<K>(client: &kube::Client, namespace: &str) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
{
    if namespace.is_empty() {
        Api::all(client.clone())
    } else {
        Api::namespaced(client.clone(), namespace)
    }
}

/// Builds the client configuration without contacting the cluster.
///
/// Uses the kubeconfig's current context when a kubeconfig is available, otherwise a bare config for the master url,
/// otherwise whatever [`Config::infer`] finds (in-cluster service account, `$KUBECONFIG`). A non-empty master url
/// always replaces the server.
pub async fn client_config(args: &Args) -> Result<Config> {
    let master_url = args.master_url()?;

    let mut config = match (args.kubeconfig_path(), &master_url) {
        (Some(path), _) => {
            trace!(?path, "loading kubeconfig");
            let kubeconfig = Kubeconfig::read_from(&path).map_err(|source| Error::Kubeconfig {
                path: path.clone(),
                source,
            })?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|source| Error::Kubeconfig { path, source })?
        }
        (None, Some(url)) => Config::new(url.clone()),
        (None, None) => Config::infer().await?,
    };

    if let Some(url) = master_url {
        config.cluster_url = url;
    }

    Ok(config)
}

pub async fn connect(args: &Args) -> Result<kube::Client> {
    let config = client_config(args).await?;
    let host = config.cluster_url.to_string();
    info!("Dialing {host}...");
    kube::Client::try_from(config).map_err(|source| Error::Client { host, source })
}
