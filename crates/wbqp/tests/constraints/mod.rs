#[macro_use]
extern crate approx;

mod contact;
mod robot;
mod self_collision;
