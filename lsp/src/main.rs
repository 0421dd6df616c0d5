#[tokio::main]
async fn main() {
    ezsql_lsp::run().await;
}
