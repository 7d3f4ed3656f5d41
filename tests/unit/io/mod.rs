mod configuration;
mod image;
mod logging;
