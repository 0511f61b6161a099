pub(crate) mod database;
pub(crate) mod help;
pub(crate) mod logfile;
pub(crate) mod metrics_menu;
pub(crate) mod monitoring;
pub(crate) mod resources;
pub(crate) mod sessions;
