mod abort;
mod integration;
