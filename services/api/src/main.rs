use event_amplify_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("event-amplify-api failed: {err}");
        std::process::exit(1);
    }
}
