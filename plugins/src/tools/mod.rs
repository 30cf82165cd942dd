mod command;

pub use command::CommandTool;
