//! BGP scoped tracing macros which tag every event with `proto = "bgp"`.

macro_rules! bgp_warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(proto = "bgp", $($arg)*)
    };
}

macro_rules! bgp_debug {
    ($($arg:tt)*) => {
        ::tracing::debug!(proto = "bgp", $($arg)*)
    };
}

macro_rules! bgp_trace {
    ($($arg:tt)*) => {
        ::tracing::trace!(proto = "bgp", $($arg)*)
    };
}

pub(crate) use {bgp_debug, bgp_trace, bgp_warn};
