/// Read-through caching over a `Cache`.
///
/// Checks the cache first and returns the hit if present. On a miss (or an
/// unreachable cache) it runs the provided block, stores the computed value
/// in the background, and returns it.
///
/// # Arguments
/// * `$cache`: a `Cache` instance (`get_from_cache` / `set_in_background`).
/// * `$key`: the `CacheKey` for the value.
/// * `$ttl`: time-to-live for the cached value, in seconds.
/// * `$block`: async block computing the value on a miss; may use `?`.
///
/// # Example
/// ```rust,ignore
/// let media = cached!(cache, CacheKey::MediaLookup(id), 3600, async move {
///     fetch_from_upstream(&id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
