//! Plain value snapshots of the cluster objects a report looks at.
//!
//! The conversions apply the API server's defaults for fields that come back empty, so the rest of the crate never
//! has to deal with the `Option` layers of the `k8s-openapi` types.

use k8s_openapi::{
    api::core::v1::{
        Node,
        Pod,
        Service,
        ServicePort,
    },
    apimachinery::pkg::util::intstr::IntOrString,
};

pub const INTERNAL_IP: &str = "InternalIP";
pub const NODE_PORT: &str = "NodePort";
const DEFAULT_SERVICE_TYPE: &str = "ClusterIP";
const DEFAULT_PROTOCOL: &str = "TCP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub addresses: Vec<NodeAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    /// e.g. `InternalIP`, `ExternalIP`, `Hostname`
    pub type_: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodInfo {
    pub name: String,
    /// Empty while the pod is not scheduled.
    pub host_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub type_: String,
    pub ports: Vec<PortInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub protocol: String,
    pub port: i32,
    /// Port number or named container port, empty if unset.
    pub target_port: String,
    /// Zero unless the API server allocated a node port.
    pub node_port: i32,
}

impl NodeInfo {
    pub fn new<T, A>(name: impl Into<String>, addresses: impl IntoIterator<Item = (T, A)>) -> Self
    where
        T: Into<String>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            addresses: addresses
                .into_iter()
                .map(|(type_, address)| NodeAddress {
                    type_: type_.into(),
                    address: address.into(),
                })
                .collect(),
        }
    }

    pub fn internal_ips(&self) -> impl Iterator<Item = &str> {
        self.addresses
            .iter()
            .filter(|addr| addr.type_ == INTERNAL_IP)
            .map(|addr| addr.address.as_str())
    }
}

impl ServiceInfo {
    pub fn is_node_port(&self) -> bool {
        self.type_ == NODE_PORT
    }
}

impl From<&Node> for NodeInfo {
    fn from(node: &Node) -> Self {
        let addresses = node
            .status
            .as_ref()
            .and_then(|status| status.addresses.as_ref())
            .map(|addresses| {
                addresses
                    .iter()
                    .map(|addr| NodeAddress {
                        type_: addr.type_.clone(),
                        address: addr.address.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: node.metadata.name.clone().unwrap_or_default(),
            addresses,
        }
    }
}

impl From<&Pod> for PodInfo {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            host_ip: pod
                .status
                .as_ref()
                .and_then(|status| status.host_ip.clone())
                .unwrap_or_default(),
        }
    }
}

impl From<&Service> for ServiceInfo {
    fn from(svc: &Service) -> Self {
        let spec = svc.spec.as_ref();
        Self {
            name: svc.metadata.name.clone().unwrap_or_default(),
            type_: spec
                .and_then(|spec| spec.type_.clone())
                .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
            ports: spec
                .and_then(|spec| spec.ports.as_ref())
                .map(|ports| ports.iter().map(PortInfo::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<&ServicePort> for PortInfo {
    fn from(port: &ServicePort) -> Self {
        Self {
            protocol: port.protocol.clone().unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            port: port.port,
            target_port: match &port.target_port {
                Some(IntOrString::Int(n)) => n.to_string(),
                Some(IntOrString::String(name)) => name.clone(),
                None => String::new(),
            },
            node_port: port.node_port.unwrap_or_default(),
        }
    }
}
