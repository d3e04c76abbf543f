mod common;
mod graph_basic;
