use crate::Price;

/// Fixed-capacity FIFO of prices. Once full, each push returns the value
/// pushed `capacity` calls earlier. Storage grows while filling.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer {
    buffer: Vec<Price>,
    head: usize,
    capacity: usize,
}

impl RingBuffer {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::new(),
            head: 0,
            capacity,
        }
    }

    #[inline]
    pub(crate) fn is_ready(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Price) -> Option<Price> {
        if self.is_ready() {
            let old = self.buffer[self.head];

            self.buffer[self.head] = value;

            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer.push(value);

            None
        }
    }
}
