#[tokio::main]
async fn main() {
    if let Err(e) = dsvtoken::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
