pub mod client;

pub use client::RemoteNormalizerImpl;
