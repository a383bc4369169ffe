//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the RX core state and the
//! fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: R0-R15, 32 bits each (R0 doubles as SP in assembly source)
//! - **Program counter** (PC)
//! - **Stack pointers**: user (USP) and interrupt (ISP)
//! - **Accumulator** (ACC): 64 bits, reserved for multiply-accumulate
//! - **PSW**: I, U, PM, IPL, O, S, Z, C
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! - `reset()`: Power-on state, PC loaded from the reset vector
//! - `step()`: Execute one instruction, return its cycle cost
//! - `run()`: Execute whole instructions until a cycle budget is used up or
//!   a breakpoint is reached
//!
//! An unrecognized opcode never stops execution: it is logged, recorded as
//! the last fault, and skipped one byte at a time.

use std::collections::HashSet;

use crate::address_map::{RAM_END, RESET_VECTOR};
use crate::instructions;
use crate::opcodes::{self, Instruction};
use crate::{ExecutionFault, MemoryBus};

/// ISP value after reset.
///
/// Real hardware leaves ISP undefined until software sets it. The simulator
/// points it just past the top of RAM so a full-descending stack works
/// without setup code.
pub const INITIAL_ISP: u32 = RAM_END + 1;

/// Processor status word.
///
/// # Bit Layout
///
/// | Bits | Field | Meaning |
/// |------|-------|---------|
/// | 0 | C | Carry |
/// | 1 | Z | Zero |
/// | 2 | S | Sign |
/// | 3 | O | Overflow |
/// | 16 | I | Interrupts enabled |
/// | 17 | U | User stack active |
/// | 20 | PM | User mode (0 = supervisor) |
/// | 24-27 | IPL | Interrupt priority level |
///
/// `Default` is the power-on value: everything clear, supervisor mode, IPL 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Psw {
    pub i: bool,
    pub u: bool,
    pub pm: bool,
    /// 0-15; `from_bits` and `set_ipl` keep it in range.
    pub ipl: u8,
    pub o: bool,
    pub s: bool,
    pub z: bool,
    pub c: bool,
}

impl Psw {
    const C: u32 = 1 << 0;
    const Z: u32 = 1 << 1;
    const S: u32 = 1 << 2;
    const O: u32 = 1 << 3;
    const I: u32 = 1 << 16;
    const U: u32 = 1 << 17;
    const PM: u32 = 1 << 20;
    const IPL_SHIFT: u32 = 24;
    const IPL_MASK: u32 = 0x0F;

    /// Packs the flags into the 32-bit PSW layout.
    ///
    /// ```
    /// use rxsim::cpu::Psw;
    ///
    /// let psw = Psw { i: true, z: true, ipl: 3, ..Psw::default() };
    /// assert_eq!(psw.to_bits(), 0x0301_0002);
    /// ```
    pub fn to_bits(&self) -> u32 {
        let mut bits = (u32::from(self.ipl) & Self::IPL_MASK) << Self::IPL_SHIFT;
        for (set, mask) in [
            (self.c, Self::C),
            (self.z, Self::Z),
            (self.s, Self::S),
            (self.o, Self::O),
            (self.i, Self::I),
            (self.u, Self::U),
            (self.pm, Self::PM),
        ] {
            if set {
                bits |= mask;
            }
        }
        bits
    }

    /// Unpacks a 32-bit PSW value. Reserved bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            i: bits & Self::I != 0,
            u: bits & Self::U != 0,
            pm: bits & Self::PM != 0,
            ipl: ((bits >> Self::IPL_SHIFT) & Self::IPL_MASK) as u8,
            o: bits & Self::O != 0,
            s: bits & Self::S != 0,
            z: bits & Self::Z != 0,
            c: bits & Self::C != 0,
        }
    }
}

/// Read-only copy of the CPU state for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub pc: u32,
    pub usp: u32,
    pub isp: u32,
    pub registers: [u32; 16],
    pub psw: Psw,
}

/// RX CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. The CPU
/// owns its memory for the whole session; drivers reach it through
/// [`memory`](CPU::memory) and [`memory_mut`](CPU::memory_mut).
///
/// # Examples
///
/// ```
/// use rxsim::{assemble, AddressSpace, CPU};
/// use rxsim::address_map::{RESET_VECTOR, ROM_START};
///
/// let program = assemble("MOV.L #5, R1\nADD.L #-2, R1");
/// assert!(program.is_ok());
///
/// let mut memory = AddressSpace::new();
/// memory.load(&program.bytes, ROM_START);
/// memory.load(&ROM_START.to_le_bytes(), RESET_VECTOR);
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), ROM_START);
///
/// assert_eq!(cpu.step(), 2);
/// assert_eq!(cpu.step(), 2);
/// assert_eq!(cpu.register(1), 3);
/// ```
pub struct CPU<M: MemoryBus> {
    /// General purpose registers R0-R15
    pub(crate) registers: [u32; 16],

    /// Program counter (address of next instruction)
    pub(crate) pc: u32,

    /// User stack pointer
    pub(crate) usp: u32,

    /// Interrupt stack pointer
    pub(crate) isp: u32,

    /// 64-bit accumulator (no instruction in the subset touches it)
    pub(crate) acc: u64,

    /// Processor status word
    pub(crate) psw: Psw,

    /// Total cycles since reset
    pub(crate) cycles: u64,

    /// Instructions stepped since reset, unrecognized bytes included
    pub(crate) instructions: u64,

    /// Most recent recoverable fault
    pub(crate) last_fault: Option<ExecutionFault>,

    /// Faults since reset
    pub(crate) fault_count: u64,

    /// Execution breakpoint addresses (survive reset)
    pub(crate) breakpoints: HashSet<u32>,

    /// PC of the breakpoint that ended the last run, if one did
    pub(crate) breakpoint_hit: Option<u32>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU bound to `memory` and performs a reset.
    ///
    /// The reset vector must already be in memory for PC to be meaningful;
    /// call [`reset`](CPU::reset) again after loading it otherwise.
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            registers: [0; 16],
            pc: 0,
            usp: 0,
            isp: 0,
            acc: 0,
            psw: Psw::default(),
            cycles: 0,
            instructions: 0,
            last_fault: None,
            fault_count: 0,
            breakpoints: HashSet::new(),
            breakpoint_hit: None,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Puts the CPU in its power-on state.
    ///
    /// - R0-R15, USP and ACC are zeroed
    /// - PSW is cleared: interrupts disabled, supervisor mode, IPL 0
    /// - PC is loaded from the 32-bit little-endian reset vector
    /// - ISP is set to [`INITIAL_ISP`]
    /// - cycle, instruction and fault counters are cleared
    ///
    /// Memory is not touched; RAM clearing is the address space's own reset.
    /// Breakpoints are kept.
    pub fn reset(&mut self) {
        self.registers = [0; 16];
        self.usp = 0;
        self.acc = 0;
        self.psw = Psw::default();
        self.pc = self.memory.read32(RESET_VECTOR);
        self.isp = INITIAL_ISP;
        self.cycles = 0;
        self.instructions = 0;
        self.last_fault = None;
        self.fault_count = 0;
        self.breakpoint_hit = None;

        log::debug!("reset: pc=0x{:08X} isp=0x{:08X}", self.pc, self.isp);
    }

    /// Executes one instruction and returns its cycle cost.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Decode the bytes at PC against the ordered pattern table
    /// 2. Run the matching handler
    /// 3. Advance PC by the encoding length
    /// 4. Charge the cycle cost
    ///
    /// An unrecognized byte costs one cycle and advances PC by one; the fault
    /// is logged and kept in [`last_fault`](CPU::last_fault).
    pub fn step(&mut self) -> u32 {
        let pc = self.pc;
        let decoded = opcodes::decode(&self.memory, pc);

        match decoded.instruction {
            Instruction::Unrecognized { opcode } => {
                let fault = ExecutionFault::UnrecognizedOpcode { opcode, pc };
                log::warn!("{}", fault);
                self.last_fault = Some(fault);
                self.fault_count += 1;
            }
            instruction => {
                log::trace!("0x{:08X}: {:?}", pc, instruction);
                instructions::execute(self, instruction);
            }
        }

        self.pc = pc.wrapping_add(u32::from(decoded.size_bytes));
        self.cycles += u64::from(decoded.cycles);
        self.instructions += 1;

        u32::from(decoded.cycles)
    }

    /// Runs whole instructions until at least `cycle_budget` cycles have elapsed.
    ///
    /// Returns the cycles actually consumed, which can exceed the budget by
    /// up to one instruction's cost.
    ///
    /// Execution stops early, without running it, at any instruction after
    /// the first whose address is a breakpoint; [`breakpoint_hit`] then
    /// reports that address. A run started on a breakpoint resumes past it.
    ///
    /// [`breakpoint_hit`]: CPU::breakpoint_hit
    pub fn run(&mut self, cycle_budget: u64) -> u64 {
        self.run_with(cycle_budget, |_| {})
    }

    /// Like [`run`](CPU::run), calling `after_step` with each instruction's
    /// cycle cost as soon as it completes.
    ///
    /// Drivers use this to advance peripherals in lockstep with the CPU.
    pub fn run_with<F: FnMut(u32)>(&mut self, cycle_budget: u64, mut after_step: F) -> u64 {
        self.breakpoint_hit = None;

        let mut consumed = 0;
        while consumed < cycle_budget {
            if consumed > 0 && self.breakpoints.contains(&self.pc) {
                log::debug!("breakpoint at 0x{:08X}", self.pc);
                self.breakpoint_hit = Some(self.pc);
                break;
            }
            let cycles = self.step();
            after_step(cycles);
            consumed += u64::from(cycles);
        }
        consumed
    }

    // ========== Breakpoints ==========

    /// Stops future runs before the instruction at `addr`.
    pub fn add_breakpoint(&mut self, addr: u32) {
        self.breakpoints.insert(addr);
    }

    /// Removes the breakpoint at `addr`, returning whether one was set.
    pub fn remove_breakpoint(&mut self, addr: u32) -> bool {
        self.breakpoints.remove(&addr)
    }

    /// Sets the breakpoint at `addr` if absent, clears it otherwise.
    ///
    /// Returns true if a breakpoint is set afterwards.
    pub fn toggle_breakpoint(&mut self, addr: u32) -> bool {
        if self.breakpoints.remove(&addr) {
            false
        } else {
            self.breakpoints.insert(addr);
            true
        }
    }

    pub fn is_breakpoint(&self, addr: u32) -> bool {
        self.breakpoints.contains(&addr)
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// All breakpoint addresses, ascending.
    pub fn breakpoints(&self) -> Vec<u32> {
        let mut addrs: Vec<u32> = self.breakpoints.iter().copied().collect();
        addrs.sort_unstable();
        addrs
    }

    /// Address of the breakpoint that stopped the most recent run, if any.
    pub fn breakpoint_hit(&self) -> Option<u32> {
        self.breakpoint_hit
    }

    /// Returns an immutable copy of the driver-visible state.
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.pc,
            usp: self.usp,
            isp: self.isp,
            registers: self.registers,
            psw: self.psw,
        }
    }

    // ========== Memory Access ==========

    /// Returns the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns the memory bus mutably, for loading programs.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Register Access ==========

    /// Returns register `index`. Only the low four bits of `index` are used.
    pub fn register(&self, index: u8) -> u32 {
        self.registers[usize::from(index & 0x0F)]
    }

    /// Sets register `index`. Only the low four bits of `index` are used.
    pub fn set_register(&mut self, index: u8, value: u32) {
        self.registers[usize::from(index & 0x0F)] = value;
    }

    /// Returns all sixteen general purpose registers.
    pub fn registers(&self) -> &[u32; 16] {
        &self.registers
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u32) {
        self.pc = value;
    }

    /// Returns the user stack pointer.
    pub fn usp(&self) -> u32 {
        self.usp
    }

    /// Returns the interrupt stack pointer.
    pub fn isp(&self) -> u32 {
        self.isp
    }

    /// Returns the 64-bit accumulator.
    pub fn acc(&self) -> u64 {
        self.acc
    }

    /// Returns the processor status word.
    pub fn psw(&self) -> Psw {
        self.psw
    }

    /// Returns the total number of cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the number of steps taken since reset.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Returns the most recent unrecognized-opcode fault, if any since reset.
    pub fn last_fault(&self) -> Option<ExecutionFault> {
        self.last_fault
    }

    /// Returns the number of unrecognized opcodes skipped since reset.
    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }

    // ========== Status Flag Access ==========

    /// Returns true if interrupts are enabled.
    pub fn flag_i(&self) -> bool {
        self.psw.i
    }

    /// Returns true if the user stack is active.
    pub fn flag_u(&self) -> bool {
        self.psw.u
    }

    /// Returns true in user mode, false in supervisor mode.
    pub fn flag_pm(&self) -> bool {
        self.psw.pm
    }

    /// Returns the interrupt priority level (0-15).
    pub fn ipl(&self) -> u8 {
        self.psw.ipl
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_o(&self) -> bool {
        self.psw.o
    }

    /// Returns true if the Sign flag is set.
    pub fn flag_s(&self) -> bool {
        self.psw.s
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.psw.z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.psw.c
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.psw.i = value;
    }

    pub fn set_flag_o(&mut self, value: bool) {
        self.psw.o = value;
    }

    pub fn set_flag_s(&mut self, value: bool) {
        self.psw.s = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.psw.z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.psw.c = value;
    }

    /// Sets the interrupt priority level, keeping the low four bits.
    pub fn set_ipl(&mut self, level: u8) {
        self.psw.ipl = level & 0x0F;
    }
}
