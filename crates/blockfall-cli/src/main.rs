mod command;
mod play;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
