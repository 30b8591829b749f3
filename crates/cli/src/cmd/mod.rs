mod erase;
mod export;
mod import;
mod list;
mod replay;
mod show;

pub use erase::cmd_erase;
pub use export::cmd_export;
pub use import::cmd_import;
pub use list::cmd_list;
pub use replay::cmd_replay;
pub use show::cmd_show;
