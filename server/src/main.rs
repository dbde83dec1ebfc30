#[tokio::main]
async fn main() {
    mindcheck_server::start_server().await;
}
