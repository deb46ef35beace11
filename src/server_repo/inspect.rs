// Pure mapping from Docker inspect payloads to domain types

use std::collections::BTreeMap;

use bollard::models::ContainerInspectResponse;

use crate::models::ContainerInfo;

/// Flatten the parts of an inspect response the panel cares about. Missing
/// fields become empty strings; nothing here is load-bearing.
pub fn container_info_from_inspect(details: ContainerInspectResponse) -> ContainerInfo {
    let image = details
        .config
        .as_ref()
        .and_then(|c| c.image.clone())
        .unwrap_or_default();
    let network_mode = details
        .host_config
        .as_ref()
        .and_then(|h| h.network_mode.clone())
        .unwrap_or_default();

    let mut ports = BTreeMap::new();
    if let Some(port_map) = details.network_settings.and_then(|n| n.ports) {
        for (port, bindings) in port_map {
            let bound = bindings
                .unwrap_or_default()
                .into_iter()
                .map(|b| {
                    format!(
                        "{}:{}",
                        b.host_ip.unwrap_or_default(),
                        b.host_port.unwrap_or_default()
                    )
                })
                .collect();
            ports.insert(port, bound);
        }
    }

    ContainerInfo {
        id: details.id.unwrap_or_default(),
        name: details
            .name
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_default(),
        image,
        created: details.created.unwrap_or_default(),
        restart_count: details.restart_count.unwrap_or(0),
        network_mode,
        ports,
    }
}

/// Parse Docker's `KEY=value` environment list. An entry without `=` keeps
/// its full text as the key and maps to `None`; values keep any further `=`
/// characters intact.
pub fn parse_env(env: &[String]) -> BTreeMap<String, Option<String>> {
    env.iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) => (key.to_string(), Some(value.to_string())),
            None => (entry.clone(), None),
        })
        .collect()
}
