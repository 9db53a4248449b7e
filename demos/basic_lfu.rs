use freqcache::builder::CacheBuilder;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = CacheBuilder::new(2).build::<&str, String>();

    cache.insert("a", "alpha".to_string());
    cache.insert("b", "beta".to_string());

    cache.get(&"a");
    cache.insert("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("freq of a: {:?}", cache.frequency(&"a"));

    let evicted = cache.evict(10);
    println!("evicted {} entries, {} left", evicted, cache.len());
}

// Expected output:
// contains a? true
// contains b? false
// freq of a: Some(2)
// evicted 2 entries, 0 left
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so "b" is evicted.
// Run with RUST_LOG=freqcache=trace to see eviction events.
