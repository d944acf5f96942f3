/// Data layer: sunspot types, loading, filtering, smoothing and cycle folding.
///
/// Architecture:
/// ```text
///  SN_d_tot_V2.0.txt / SN_m_tot_V2.0.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fixed-width rows → ObservationSeries (memoized per file)
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  filter   │  years   │  cycle    │  fractional year mod L
///   └──────────┘          └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ smoothing  │  trailing moving average
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV of raw + smoothed
///   └──────────┘
/// ```

pub mod cycle;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod smoothing;
