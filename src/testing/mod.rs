pub mod stubs;
