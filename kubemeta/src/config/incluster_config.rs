use std::path::Path;

pub const SERVICE_HOSTENV: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORTENV: &str = "KUBERNETES_SERVICE_PORT";

// Mounted credential files
pub const SERVICE_TOKENFILE: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
pub const SERVICE_DEFAULT_NS: &str = "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

/// Returns the apiserver url advertised to pods through the environment
pub fn kube_server() -> Option<String> {
    let host = std::env::var(SERVICE_HOSTENV).ok()?;
    let port = std::env::var(SERVICE_PORTENV).ok()?;
    Some(server_url(&host, &port))
}

fn server_url(host: &str, port: &str) -> String {
    // ipv6 hosts need brackets in a url authority
    if host.contains(':') {
        format!("https://[{host}]:{port}")
    } else {
        format!("https://{host}:{port}")
    }
}

/// Returns the service account token mounted at `path`
pub fn load_token(path: impl AsRef<Path>) -> std::io::Result<String> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Returns the default namespace mounted at `path`
pub fn load_default_ns(path: impl AsRef<Path>) -> std::io::Result<String> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}
