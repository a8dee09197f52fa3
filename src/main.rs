#[tokio::main]
async fn main() {
    if let Err(e) = nft_options_lib::run().await {
        eprintln!("nft-options: {e}");
        std::process::exit(1);
    }
}
