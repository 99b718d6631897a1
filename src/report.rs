use crate::{
    cluster::ClusterApi,
    endpoints::{
        self,
        ConnectionRow,
    },
    error::{
        Error,
        Result,
    },
    filter::NameFilter,
    snapshot::{
        NodeInfo,
        PodInfo,
        ServiceInfo,
    },
    table::Table,
};
use std::io::Write;

/// Number of data rows printed per section.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub node_addresses: usize,
    pub pods: usize,
    pub service_ports: usize,
    pub connections: usize,
}

/// Prints the nodes, pods, services and exposed endpoints tables to `out`, in that order.
///
/// Each section is fetched right before it is printed, so on failure the sections already written stay in `out`.
#[instrument(level = "debug", skip_all, fields(%namespace, %filter))]
pub async fn run<C, W>(cluster: &C, namespace: &str, filter: &NameFilter, out: &mut W) -> Result<Summary>
where
    C: ClusterApi,
    W: Write,
{
    let mut summary = Summary::default();

    let nodes = cluster.list_nodes().await.map_err(Error::list("nodes"))?;
    info!("Nodes found:");
    summary.node_addresses = node_table(&nodes).write_to(out)?;

    let pods = cluster.list_pods(namespace).await.map_err(Error::list("pods"))?;
    info!("Pods matching `{filter}` are found:");
    summary.pods = pod_table(&pods, filter).write_to(out)?;

    let services = cluster
        .list_services(namespace)
        .await
        .map_err(Error::list("services"))?;
    info!("Services matching `{filter}` are found:");
    summary.service_ports = service_table(&services, filter).write_to(out)?;

    info!("Writing connection strings for exposed by NodePort services");
    let exposed = endpoints::resolve(&services, &nodes, filter);
    let rows = endpoints::connection_rows(&exposed);
    summary.connections = connection_table(&rows).write_to(out)?;

    debug!(?summary, "report written");
    Ok(summary)
}

/// One row per node address. All rows of a node carry the node's position.
pub fn node_table(nodes: &[NodeInfo]) -> Table {
    let mut table = Table::new(["Name", "Type", "Address"]);
    for (i, node) in nodes.iter().enumerate() {
        for addr in &node.addresses {
            table.add_row(i + 1, [node.name.clone(), addr.type_.clone(), addr.address.clone()]);
        }
    }
    table
}

pub fn pod_table(pods: &[PodInfo], filter: &NameFilter) -> Table {
    let mut table = Table::new(["Name", "NodeIP"]);
    for (i, pod) in pods.iter().filter(|pod| filter.matches(&pod.name)).enumerate() {
        table.add_row(i + 1, [pod.name.clone(), pod.host_ip.clone()]);
    }
    table
}

/// One row per port of every matching service.
pub fn service_table(services: &[ServiceInfo], filter: &NameFilter) -> Table {
    let mut table = Table::new(["Name", "Protocol", "Port", "Target", "NodePort", "Type"]);
    let rows = services
        .iter()
        .filter(|svc| filter.matches(&svc.name))
        .flat_map(|svc| svc.ports.iter().map(move |port| (svc, port)));
    for (i, (svc, port)) in rows.enumerate() {
        table.add_row(i + 1, [
            svc.name.clone(),
            port.protocol.clone(),
            port.port.to_string(),
            port.target_port.clone(),
            port.node_port.to_string(),
            svc.type_.clone(),
        ]);
    }
    table
}

pub fn connection_table(rows: &[ConnectionRow]) -> Table {
    let mut table = Table::new(["Name", "Protocol", "Connection"]);
    for (i, row) in rows.iter().enumerate() {
        table.add_row(i + 1, [row.service.clone(), row.protocol.clone(), row.connection.clone()]);
    }
    table
}
