use civitas::utils::errors::CivitasError;

fn main() -> Result<(), CivitasError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            civitas::lib_main().await
        })
}
