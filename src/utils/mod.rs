//! Utility modules, loaded first for their side effects

pub mod panic_hook;

use crate::plugins::descriptor::Module;

pub fn catalog() -> Vec<(&'static str, Module)> {
    vec![("panic_hook", Module::util(Some(panic_hook::install)))]
}
