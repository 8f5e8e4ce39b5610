//! Stack plane operations.
//!
//! Entry `i` (0 is the bottom) lives at `stack_ptr + i * 32`; the live depth
//! is tracked in the control block. Handlers may overwrite a freshly popped
//! slot in place before shrinking: a popped slot is scratch, never live data.

use crate::core::{
    context::ExecutionContext,
    errors::Fault,
    layout::{MAX_STACK_DEPTH, WORD_SIZE},
    word::Word,
};

impl ExecutionContext<'_> {
    /// Current stack depth.
    pub fn stack_depth(&self) -> usize {
        self.frame.stack_size as usize
    }

    /// Copies the word `from_top` entries below the top of the stack.
    pub fn stack_peek(&self, from_top: usize) -> Result<Word, Fault> {
        let depth = self.stack_depth();
        if from_top >= depth {
            return Err(Fault::StackUnderflow);
        }
        let at = (depth - 1 - from_top) * WORD_SIZE;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.stack[at..at + WORD_SIZE]);
        Ok(word)
    }

    /// Overwrites the word `from_top` entries below the top of the stack.
    pub fn stack_write(&mut self, from_top: usize, word: &Word) -> Result<(), Fault> {
        let depth = self.stack_depth();
        if from_top >= depth {
            return Err(Fault::StackUnderflow);
        }
        let at = (depth - 1 - from_top) * WORD_SIZE;
        self.stack[at..at + WORD_SIZE].copy_from_slice(word);
        Ok(())
    }

    /// Pushes a word onto the stack.
    pub fn stack_push(&mut self, word: &Word) -> Result<(), Fault> {
        let depth = self.stack_depth();
        if depth >= MAX_STACK_DEPTH {
            return Err(Fault::StackOverflow);
        }
        let at = depth * WORD_SIZE;
        self.stack[at..at + WORD_SIZE].copy_from_slice(word);
        self.frame.stack_size += 1;
        Ok(())
    }

    /// Pops the top word off the stack.
    pub fn stack_pop(&mut self) -> Result<Word, Fault> {
        let word = self.stack_peek(0)?;
        self.frame.stack_size -= 1;
        Ok(word)
    }

    /// Drops `n` entries off the top of the stack.
    pub fn stack_shrink(&mut self, n: usize) -> Result<(), Fault> {
        if self.stack_depth() < n {
            return Err(Fault::StackUnderflow);
        }
        self.frame.stack_size -= n as i32;
        Ok(())
    }

    /// Swaps the top of the stack with the entry `n` below it.
    pub fn stack_swap(&mut self, n: usize) -> Result<(), Fault> {
        let top = self.stack_peek(0)?;
        let other = self.stack_peek(n)?;
        self.stack_write(0, &other)?;
        self.stack_write(n, &top)
    }

    /// Pushes a copy of the entry `n - 1` below the top of the stack.
    pub fn stack_dup(&mut self, n: usize) -> Result<(), Fault> {
        let word = self.stack_peek(n - 1)?;
        self.stack_push(&word)
    }
}
