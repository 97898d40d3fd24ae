use clap::Parser;
use stargazer_contacts_app::Args;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    match stargazer_contacts_app::export_stargazers(args).await {
        Ok(summary) => println!("{}", summary),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
