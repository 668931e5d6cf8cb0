mod app;
mod audio;
mod config;
mod desktop;
mod equalizer;
mod library;
mod mpris;
mod persist;
mod player;
mod runtime;
mod ui;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
