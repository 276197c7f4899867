mod measure_host_latency;

pub use measure_host_latency::MeasureHostLatencyUseCase;
