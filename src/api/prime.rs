/// Trial division up to the square root.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }

    true
}

/// Find the `n`-th prime (1-indexed, so `nth_prime(1) == 2`).
///
/// There is no upper bound on the search: large ordinals run for as long as
/// they take and overflow past `u64::MAX`. `nth_prime(0)` returns 1, since the
/// counter already matches before the first prime is found.
pub fn nth_prime(n: u32) -> u64 {
    let mut counter = 0u32;

    let mut candidate = 1u64;
    loop {
        if is_prime(candidate) {
            counter += 1;
        }

        if counter == n {
            return candidate;
        }
        candidate += 1;
    }
}
