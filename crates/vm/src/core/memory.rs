//! Memory plane operations.
//!
//! Memory is byte-addressed, grows in 32-byte words, and zero-fills every
//! newly created byte. The host reserves the plane up to the expansion
//! ceiling; growing past the ceiling halts the frame.

use crate::core::{
    context::ExecutionContext,
    errors::Fault,
    layout::{MAX_MEMORY_BYTES, WORD_SIZE},
    word::Word,
};

impl ExecutionContext<'_> {
    /// Current memory size in bytes. Always a multiple of 32.
    pub fn memory_size(&self) -> usize {
        self.frame.memory_size as usize
    }

    /// Grows memory to cover `[offset, offset + len)`, rounding the new size
    /// up to a 32-byte boundary and zero-filling the created bytes.
    pub fn ensure_memory(&mut self, offset: usize, len: usize) -> Result<(), Fault> {
        if len == 0 {
            return Ok(());
        }

        let required = offset.checked_add(len).ok_or(Fault::OutOfBounds)?;
        if required > self.memory_size() {
            let new_size = required.div_ceil(WORD_SIZE) * WORD_SIZE;
            if new_size > MAX_MEMORY_BYTES {
                return Err(Fault::OutOfBounds);
            }
            // the host may hand back a dirty plane; created bytes must read zero
            self.memory[self.frame.memory_size as usize..new_size].fill(0);
            self.frame.memory_size = new_size as i32;
        }
        Ok(())
    }

    /// Reads the 32-byte word at `offset`, growing memory to cover it.
    pub fn memory_read_word(&mut self, offset: usize) -> Result<Word, Fault> {
        self.ensure_memory(offset, WORD_SIZE)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.memory[offset..offset + WORD_SIZE]);
        Ok(word)
    }

    /// Writes a 32-byte word at `offset`, growing memory to cover it.
    pub fn memory_write_word(&mut self, offset: usize, word: &Word) -> Result<(), Fault> {
        self.ensure_memory(offset, WORD_SIZE)?;
        self.memory[offset..offset + WORD_SIZE].copy_from_slice(word);
        Ok(())
    }

    /// Writes a single byte at `offset`, growing memory to cover it.
    pub fn memory_write_byte(&mut self, offset: usize, byte: u8) -> Result<(), Fault> {
        self.ensure_memory(offset, 1)?;
        self.memory[offset] = byte;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{harness::FrameBuilder, word::u64_word};

    #[test]
    fn test_grow_rounds_to_word_boundary() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.ensure_memory(0, 1).expect("grow");
        assert_eq!(ctx.memory_size(), 32);

        ctx.ensure_memory(30, 4).expect("grow");
        assert_eq!(ctx.memory_size(), 64);
    }

    #[test]
    fn test_grow_is_idempotent_within_size() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.ensure_memory(0, 64).expect("grow");
        ctx.ensure_memory(0, 32).expect("no-op");
        assert_eq!(ctx.memory_size(), 64);
    }

    #[test]
    fn test_zero_len_does_not_grow() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.ensure_memory(4096, 0).expect("no-op");
        assert_eq!(ctx.memory_size(), 0);
    }

    #[test]
    fn test_read_grows_and_zero_fills() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        let word = ctx.memory_read_word(0).expect("read");
        assert_eq!(word, [0u8; WORD_SIZE]);
        assert_eq!(ctx.memory_size(), 32);
    }

    #[test]
    fn test_write_then_read() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.memory_write_word(32, &u64_word(0xabcd)).expect("write");
        assert_eq!(ctx.memory_read_word(32).expect("read"), u64_word(0xabcd));
        assert_eq!(ctx.memory_size(), 64);
    }

    #[test]
    fn test_unaligned_write_spans_words() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.memory_write_word(16, &[0xffu8; WORD_SIZE]).expect("write");
        assert_eq!(ctx.memory_size(), 64);
        let word = ctx.memory_read_word(0).expect("read");
        assert_eq!(word[..16], [0u8; 16]);
        assert_eq!(word[16..], [0xffu8; 16]);
    }

    #[test]
    fn test_write_byte() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.memory_write_byte(5, 0x7f).expect("write");
        assert_eq!(ctx.memory_size(), 32);
        let word = ctx.memory_read_word(0).expect("read");
        assert_eq!(word[5], 0x7f);
    }

    #[test]
    fn test_ceiling_is_enforced() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        ctx.ensure_memory(MAX_MEMORY_BYTES - 32, 32).expect("at ceiling");
        assert_eq!(ctx.memory_size(), MAX_MEMORY_BYTES);
        assert_eq!(ctx.ensure_memory(MAX_MEMORY_BYTES, 1), Err(Fault::OutOfBounds));
    }

    #[test]
    fn test_offset_overflow_is_out_of_bounds() {
        let mut host = FrameBuilder::new().build().expect("failed to build frame");
        let mut ctx = host.context();

        assert_eq!(ctx.ensure_memory(usize::MAX, 2), Err(Fault::OutOfBounds));
    }
}
