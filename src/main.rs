fn main() -> eframe::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    log::info!("starting umlcanvas");

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "UML Canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(umlcanvas::DiagramApp::new(cc)))),
    )
}
