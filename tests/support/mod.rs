#![allow(dead_code)]

pub mod architecture;
pub mod kube;
pub mod logs;
