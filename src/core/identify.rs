use std::sync::atomic;

pub type NodeId = u32;
pub type Index = usize;

static INSTANCE_COUNT: atomic::AtomicU32 = atomic::AtomicU32::new(1);

pub fn next_id() -> NodeId {
    INSTANCE_COUNT.fetch_add(1, atomic::Ordering::Relaxed) as NodeId
}
