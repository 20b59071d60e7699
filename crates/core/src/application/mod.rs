// Application Layer - marketplace services built on domain + ports

pub mod autoclose;
pub mod discovery;
