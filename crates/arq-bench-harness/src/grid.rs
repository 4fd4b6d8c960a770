use arq_bench_abstract::{Method, TrialConfiguration};

pub const FILES: [&str; 3] = ["s_sm_file", "s_md_file", "s_lg_file"];
pub const RELIABILITY_NUMBERS: [u32; 3] = [0, 10, 100];
pub const WINDOW_SIZES: [u32; 3] = [10, 40, 80];

/// Every trial of a full run, method varying slowest and window size fastest.
pub fn trial_space() -> impl Iterator<Item = TrialConfiguration> {
    Method::ALL.into_iter().flat_map(|method| {
        FILES.into_iter().flat_map(move |file| {
            RELIABILITY_NUMBERS.into_iter().flat_map(move |reliability| {
                WINDOW_SIZES
                    .into_iter()
                    .map(move |window| TrialConfiguration::new(method, file, reliability, window))
            })
        })
    })
}
