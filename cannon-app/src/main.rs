mod app;
mod participant;

pub use app::App;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let app = App::new(std::env::args().skip(1))?;
    app.run()?;
    Ok(())
}
