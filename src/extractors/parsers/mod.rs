// Per-artifact inspectors
//
// Each inspector reads one kind of file from the repository root and returns
// its own fact section, or None when the file is absent. They share no state
// and can run in any order.

pub mod docker_compose;
pub mod dockerfile;
pub mod package_json;
pub mod readme;
