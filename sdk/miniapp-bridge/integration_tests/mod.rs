mod event_pump;
mod properties;
mod sdk_init;
