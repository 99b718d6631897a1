use crate::{
    filter::NameFilter,
    snapshot::{
        NodeInfo,
        ServiceInfo,
    },
};
use std::sync::Arc;

/// A service port reachable on every node's internal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedEndpoint {
    pub service: String,
    pub protocol: String,
    pub node_port: i32,
    /// Internal node addresses, shared by every endpoint of one run.
    pub addresses: Arc<[String]>,
}

/// One `address:nodePort` line of the exposed endpoints table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRow {
    pub service: String,
    pub protocol: String,
    pub connection: String,
}

impl ExposedEndpoint {
    pub fn connections(&self) -> impl Iterator<Item = ConnectionRow> + '_ {
        self.addresses.iter().map(|address| ConnectionRow {
            service: self.service.clone(),
            protocol: self.protocol.clone(),
            connection: format!("{address}:{}", self.node_port),
        })
    }
}

/// `InternalIP` addresses of all nodes in node order. Duplicates are kept.
pub fn internal_ips(nodes: &[NodeInfo]) -> Vec<String> {
    nodes
        .iter()
        .flat_map(|node| node.internal_ips())
        .map(str::to_string)
        .collect()
}

/// Every allocated node port of the NodePort services selected by `filter`, ordered by service name descending.
/// Ports of the same service keep their declaration order.
pub fn resolve(services: &[ServiceInfo], nodes: &[NodeInfo], filter: &NameFilter) -> Vec<ExposedEndpoint> {
    let addresses: Arc<[String]> = internal_ips(nodes).into();
    let addresses = &addresses;

    let mut endpoints = services
        .iter()
        .filter(|svc| filter.matches(&svc.name) && svc.is_node_port())
        .flat_map(|svc| {
            svc.ports
                .iter()
                .filter(|port| port.node_port != 0)
                .map(move |port| ExposedEndpoint {
                    service: svc.name.clone(),
                    protocol: port.protocol.clone(),
                    node_port: port.node_port,
                    addresses: Arc::clone(addresses),
                })
        })
        .collect::<Vec<_>>();

    // stable
    endpoints.sort_by(|a, b| b.service.cmp(&a.service));
    endpoints
}

pub fn connection_rows(endpoints: &[ExposedEndpoint]) -> Vec<ConnectionRow> {
    endpoints.iter().flat_map(|endpoint| endpoint.connections()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::PortInfo;

    fn port(protocol: &str, port: i32, node_port: i32) -> PortInfo {
        PortInfo {
            protocol: protocol.to_string(),
            port,
            target_port: port.to_string(),
            node_port,
        }
    }

    fn service(name: &str, type_: &str, ports: Vec<PortInfo>) -> ServiceInfo {
        ServiceInfo {
            name: name.to_string(),
            type_: type_.to_string(),
            ports,
        }
    }

    fn two_nodes() -> Vec<NodeInfo> {
        vec![
            NodeInfo::new("n1", [("Hostname", "n1"), ("InternalIP", "10.0.0.1")]),
            NodeInfo::new("n2", [("InternalIP", "10.0.0.2"), ("ExternalIP", "203.0.113.2")]),
        ]
    }

    #[test]
    fn internal_ips_keep_node_order_and_duplicates() {
        let nodes = vec![
            NodeInfo::new("b", [("InternalIP", "10.0.0.2")]),
            NodeInfo::new("a", [("InternalIP", "10.0.0.1"), ("ExternalIP", "1.2.3.4")]),
            NodeInfo::new("c", [("InternalIP", "10.0.0.2")]),
        ];
        assert_eq!(internal_ips(&nodes), vec!["10.0.0.2", "10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn single_node_port_service() {
        let nodes = vec![NodeInfo::new("n1", [("InternalIP", "10.0.0.1")])];
        let services = vec![
            service("web", "NodePort", vec![port("TCP", 80, 30080)]),
            service("api", "ClusterIP", vec![port("TCP", 443, 0)]),
        ];

        let endpoints = resolve(&services, &nodes, &NameFilter::match_all());
        assert_eq!(
            connection_rows(&endpoints),
            vec![ConnectionRow {
                service: "web".to_string(),
                protocol: "TCP".to_string(),
                connection: "10.0.0.1:30080".to_string(),
            }]
        );
    }

    #[test]
    fn only_allocated_ports_of_node_port_services() {
        let services = vec![
            service("web", "NodePort", vec![port("TCP", 80, 30080), port("TCP", 81, 0), port("UDP", 53, 30053)]),
            // load balancers carry node ports too, they are not reported
            service("lb", "LoadBalancer", vec![port("TCP", 443, 31443)]),
            service("odd", "ClusterIP", vec![port("TCP", 8080, 30808)]),
        ];

        let endpoints = resolve(&services, &two_nodes(), &NameFilter::match_all());
        assert_eq!(endpoints.len(), 2);
        assert!(endpoints.iter().all(|ep| ep.service == "web"));
        assert_eq!(endpoints.iter().map(|ep| ep.node_port).collect::<Vec<_>>(), vec![30080, 30053]);
        assert_eq!(endpoints[1].protocol, "UDP");
    }

    #[test]
    fn sorted_by_name_descending_and_stable() {
        let services = vec![
            service("api", "NodePort", vec![port("TCP", 1, 30001)]),
            service("web", "NodePort", vec![port("TCP", 2, 30002), port("TCP", 3, 30003)]),
            service("cache", "NodePort", vec![port("TCP", 4, 30004)]),
            service("web", "NodePort", vec![port("TCP", 5, 30005)]),
        ];

        let endpoints = resolve(&services, &two_nodes(), &NameFilter::match_all());
        let order = endpoints
            .iter()
            .map(|ep| (ep.service.as_str(), ep.node_port))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![("web", 30002), ("web", 30003), ("web", 30005), ("cache", 30004), ("api", 30001)]
        );

        assert_eq!(resolve(&services, &two_nodes(), &NameFilter::match_all()), endpoints);
    }

    #[test]
    fn filter_applies_to_service_names() {
        let services = vec![
            service("web", "NodePort", vec![port("TCP", 80, 30080)]),
            service("api", "NodePort", vec![port("TCP", 443, 30443)]),
        ];
        let filter = NameFilter::new("^a").unwrap();
        let endpoints = resolve(&services, &two_nodes(), &filter);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].service, "api");
    }

    #[test]
    fn one_row_per_internal_ip_and_port() {
        let services = vec![service("web", "NodePort", vec![port("TCP", 80, 30080), port("TCP", 443, 30443)])];
        let rows = connection_rows(&resolve(&services, &two_nodes(), &NameFilter::match_all()));
        assert_eq!(
            rows.iter().map(|row| row.connection.as_str()).collect::<Vec<_>>(),
            vec!["10.0.0.1:30080", "10.0.0.2:30080", "10.0.0.1:30443", "10.0.0.2:30443"]
        );
    }

    #[test]
    fn no_internal_ips_means_no_rows() {
        let nodes = vec![NodeInfo::new("n1", [("ExternalIP", "203.0.113.1")])];
        let services = vec![service("web", "NodePort", vec![port("TCP", 80, 30080), port("TCP", 443, 30443)])];

        let endpoints = resolve(&services, &nodes, &NameFilter::match_all());
        assert_eq!(endpoints.len(), 2);
        assert!(connection_rows(&endpoints).is_empty());
    }
}
