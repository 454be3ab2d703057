mod create;
mod import;
mod update;
