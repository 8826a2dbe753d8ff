#[path = "utils/cron.rs"]
mod cron;


#[path = "utils/debounce.rs"]
mod debounce;

#[path = "utils/epoch.rs"]
mod epoch;
