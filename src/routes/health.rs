pub const HEALTH_MESSAGE: &str = "Agora token server is running";

pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}
