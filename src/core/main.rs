#![deny(clippy::all)]
#![allow(dead_code)]

#[macro_use]
extern crate log;

#[allow(unused_imports)]
use simplelog::LevelFilter;
#[allow(unused_imports)]
use simplelog::SimpleLogger;

use winsys::xdata::xconnection::XConnection;
pub use winsys::Result;

#[macro_use]
mod defaults;

mod binding;
mod change;
mod client;
mod desktop;
mod event;
mod identify;
mod location;
mod model;
mod monitor;
mod pointer;
mod status;
mod tree;
mod util;

#[cfg(test)]
mod mock;

use binding::build_mouse_bindings;
use defaults::Settings;
use defaults::MOUSE_BINDINGS;
use model::Model;

pub fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    SimpleLogger::init(LevelFilter::Debug, simplelog::Config::default())?;

    let (conn, screen_num) = x11rb::connect(None)?;
    let mut xconn = XConnection::new(&conn, screen_num)?;

    Model::new(
        &mut xconn,
        Settings::DEFAULT,
        build_mouse_bindings(MOUSE_BINDINGS),
    )
    .run();

    Ok(())
}
