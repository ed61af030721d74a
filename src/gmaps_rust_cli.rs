use gmaps_cli::gmaps_cli_opts::GmapsCliOpts;

#[tokio::main]
async fn main() {
    env_logger::init();

    match GmapsCliOpts::process_args().await {
        Ok(()) => (),
        Err(e) => {
            if e.to_string().contains("Broken pipe") {
            } else {
                panic!("{}", e)
            }
        }
    }
}
