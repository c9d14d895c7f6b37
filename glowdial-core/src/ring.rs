//! sample window storage

/// Two fixed rings with a swapped write index: the transfer side always
/// fills the ring the reader is not holding, so a completed window stays
/// stable while the next one lands.
pub struct Arena<const N: usize> {
    rings: [[u16; N]; 2],
    write: usize,
}

impl<const N: usize> Arena<N> {
    pub const fn new() -> Self {
        Self {
            rings: [[0; N], [0; N]],
            write: 0,
        }
    }

    /// ring currently owned by the writer
    pub fn write_ring(&mut self) -> &mut [u16; N] {
        &mut self.rings[self.write]
    }

    /// Mark the write ring complete and hand it to the reader; further
    /// writes land in the other ring.
    pub fn swap(&mut self) -> &[u16; N] {
        self.write ^= 1;
        &self.rings[self.write ^ 1]
    }

    /// latest completed ring
    pub fn read_ring(&self) -> &[u16; N] {
        &self.rings[self.write ^ 1]
    }
}

impl<const N: usize> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// One ring shared by writer and reader. A reader slower than the
/// sample cadence races the writer mid-window here; kept as a
/// compatibility variant for tests and the simulator, not for live use.
pub struct SampleRing<const N: usize> {
    slots: [u16; N],
    head: usize,
}

impl<const N: usize> SampleRing<N> {
    pub const fn new() -> Self {
        Self {
            slots: [0; N],
            head: 0,
        }
    }

    /// Write the next slot, wrapping; true when this write completed a
    /// full pass over the ring.
    pub fn push(&mut self, sample: u16) -> bool {
        self.slots[self.head] = sample;
        self.head = (self.head + 1) % N;
        self.head == 0
    }

    pub fn window(&self) -> &[u16; N] {
        &self.slots
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
