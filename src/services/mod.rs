pub mod environmental;
pub mod financial;
pub mod irradiance;
pub mod orchestrator;
pub mod remote;
pub mod timeseries;
pub mod weather_service;
