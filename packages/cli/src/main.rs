use std::process;

#[tokio::main]
async fn main() {
    todo_cli::init_tracing();

    if let Err(e) = todo_cli::run_server().await {
        tracing::error!("Server failed: {:#}", e);
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
