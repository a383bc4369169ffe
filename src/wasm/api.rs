//! WASM API for the RX simulator.
//!
//! The [`Simulator`] is the external driver the core expects: it owns the
//! CPU, the address space and the peripherals, refuses to load code that
//! failed to assemble, seeds the reset vector, and ticks the peripherals
//! after every instruction so interrupts are raised at instruction
//! granularity whether the host steps or runs.

use crate::address_map::{RESET_VECTOR, ROM_START};
use crate::opcodes::MAX_INSTRUCTION_SIZE;
use crate::{
    assemble, disassemble, format_instruction, AddressSpace, CompareMatchTimer, Gpio,
    InterruptController, MemoryBus, Peripheral, SerialTx, CPU,
};
use wasm_bindgen::prelude::*;

/// Result of an assembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    machine_code: Vec<u8>,
    start_addr: u32,
    end_addr: u32,
    errors: Vec<String>,
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn machine_code(&self) -> Vec<u8> {
        self.machine_code.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn start_addr(&self) -> u32 {
        self.start_addr
    }

    #[wasm_bindgen(getter)]
    pub fn end_addr(&self) -> u32 {
        self.end_addr
    }

    #[wasm_bindgen(getter)]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// All line errors, one per line of text.
    #[wasm_bindgen(getter)]
    pub fn error_text(&self) -> String {
        self.errors.join("\n")
    }
}

/// Largest memory window `disassemble` will read.
const DISASSEMBLY_WINDOW_LIMIT: usize = 0x1_0000;

/// The on-chip peripherals and the interrupt controller they raise requests on
struct Peripherals {
    interrupts: InterruptController,
    gpio: Gpio,
    timer: CompareMatchTimer,
    serial: SerialTx,
}

impl Peripherals {
    fn new() -> Self {
        Peripherals {
            interrupts: InterruptController::new(),
            gpio: Gpio::new(),
            timer: CompareMatchTimer::new(),
            serial: SerialTx::new(),
        }
    }

    fn tick(&mut self, cycles: u32) {
        let cycles = u64::from(cycles);
        self.gpio.tick(cycles, &mut self.interrupts);
        self.timer.tick(cycles, &mut self.interrupts);
        self.serial.tick(cycles, &mut self.interrupts);
    }

    fn reset(&mut self) {
        self.interrupts.clear();
        self.gpio.reset();
        self.timer.reset();
        self.serial.reset();
    }
}

/// Main simulator interface for JavaScript
#[wasm_bindgen]
pub struct Simulator {
    cpu: CPU<AddressSpace>,
    peripherals: Peripherals,
    program_start: u32,
    program_end: u32,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Simulator {
    /// Create a simulator with empty RAM, NOP-filled ROM and idle peripherals
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let mut memory = AddressSpace::new();
        memory.write32(RESET_VECTOR, ROM_START);

        Simulator {
            cpu: CPU::new(memory),
            peripherals: Peripherals::new(),
            program_start: ROM_START,
            program_end: ROM_START,
        }
    }

    /// Forward every transmitted serial byte to `on_transmit` as a
    /// one-character string
    pub fn set_transmit_callback(&mut self, on_transmit: js_sys::Function) {
        self.peripherals.serial.set_transmit_callback(move |byte| {
            let text = char::from(byte).to_string();
            let _ = on_transmit.call1(&JsValue::NULL, &JsValue::from_str(&text));
        });
    }

    /// Execute a single instruction and return its cycle cost
    ///
    /// Breakpoints do not stop a single step.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step();
        self.peripherals.tick(cycles);
        cycles
    }

    /// Execute whole instructions until at least `cycles` have elapsed or a
    /// breakpoint is reached, and return the cycles actually consumed
    pub fn run(&mut self, cycles: u32) -> f64 {
        let peripherals = &mut self.peripherals;
        let consumed = self
            .cpu
            .run_with(u64::from(cycles), |step_cycles| peripherals.tick(step_cycles));
        consumed as f64
    }

    /// Reset the CPU and peripherals; memory and breakpoints are left alone
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.peripherals.reset();
    }

    // Breakpoints

    pub fn add_breakpoint(&mut self, addr: u32) {
        self.cpu.add_breakpoint(addr);
    }

    pub fn remove_breakpoint(&mut self, addr: u32) -> bool {
        self.cpu.remove_breakpoint(addr)
    }

    /// Returns true if the breakpoint is set afterwards
    pub fn toggle_breakpoint(&mut self, addr: u32) -> bool {
        self.cpu.toggle_breakpoint(addr)
    }

    pub fn clear_breakpoints(&mut self) {
        self.cpu.clear_breakpoints();
    }

    #[wasm_bindgen(getter)]
    pub fn breakpoints(&self) -> Vec<u32> {
        self.cpu.breakpoints()
    }

    /// Address of the breakpoint that ended the last run, if any
    #[wasm_bindgen(getter)]
    pub fn breakpoint_hit(&self) -> Option<u32> {
        self.cpu.breakpoint_hit()
    }

    // Snapshot getters

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn usp(&self) -> u32 {
        self.cpu.usp()
    }

    #[wasm_bindgen(getter)]
    pub fn isp(&self) -> u32 {
        self.cpu.isp()
    }

    /// General purpose registers R0..R15
    #[wasm_bindgen(getter)]
    pub fn registers(&self) -> Vec<u32> {
        self.cpu.registers().to_vec()
    }

    /// PSW packed in the hardware bit layout
    #[wasm_bindgen(getter)]
    pub fn psw(&self) -> u32 {
        self.cpu.psw().to_bits()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    /// Number of unrecognized opcodes executed since reset
    #[wasm_bindgen(getter)]
    pub fn fault_count(&self) -> f64 {
        self.cpu.fault_count() as f64
    }

    /// Message for the most recent unrecognized opcode, if any
    #[wasm_bindgen(getter)]
    pub fn last_fault(&self) -> Option<String> {
        self.cpu.last_fault().map(|fault| fault.to_string())
    }

    // Peripheral access

    /// Serial output since the last reset
    #[wasm_bindgen(getter)]
    pub fn serial_output(&self) -> String {
        self.peripherals.serial.tx_log().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn gpio_output(&self) -> u8 {
        self.peripherals.gpio.output_byte()
    }

    pub fn set_gpio_input(&mut self, bit: u8, level: bool) {
        self.peripherals.gpio.set_input_bit(bit, level);
    }

    #[wasm_bindgen(getter)]
    pub fn timer_counter(&self) -> u32 {
        self.peripherals.timer.counter()
    }

    #[wasm_bindgen(getter)]
    pub fn pending_interrupts(&self) -> usize {
        self.peripherals.interrupts.len()
    }

    /// Write a peripheral register by block name ("gpio", "timer", "serial")
    pub fn write_peripheral(&mut self, block: &str, offset: u32, value: u8) -> bool {
        match block {
            "gpio" => self.peripherals.gpio.write8(offset, value),
            "timer" => self.peripherals.timer.write8(offset, value),
            "serial" => self.peripherals.serial.write8(offset, value),
            _ => return false,
        }
        true
    }

    // Memory access methods

    pub fn read_memory(&self, addr: u32) -> u8 {
        self.cpu.memory().read8(addr)
    }

    pub fn write_memory(&mut self, addr: u32, value: u8) {
        self.cpu.memory_mut().write8(addr, value);
    }

    /// Read `len` bytes starting at `start` (for efficient display)
    pub fn get_memory(&self, start: u32, len: usize) -> Vec<u8> {
        self.cpu.memory().dump(start, len)
    }

    /// Hex/ASCII listing of `len` bytes starting at `start`
    pub fn dump_hex(&self, start: u32, len: usize) -> String {
        self.cpu.memory().dump_hex(start, len)
    }

    /// Assemble RX source code without loading it
    pub fn assemble(&self, source: &str, start_addr: u32) -> AssemblyResult {
        let output = assemble(source);
        let end_addr = start_addr.wrapping_add(output.bytes.len() as u32);
        AssemblyResult {
            success: output.is_ok(),
            start_addr,
            end_addr,
            errors: output.errors.iter().map(|e| e.to_string()).collect(),
            machine_code: output.bytes,
        }
    }

    /// Assemble, and only if every line assembled, load the code at
    /// `start_addr`, point the reset vector at it and reset
    ///
    /// RAM is cleared before loading so stale data from an earlier program
    /// does not survive.
    pub fn assemble_and_load(&mut self, source: &str, start_addr: u32) -> AssemblyResult {
        let mut result = self.assemble(source, start_addr);
        if !result.success {
            return result;
        }

        if self.cpu.memory().region_of(start_addr).is_none() {
            result.success = false;
            result
                .errors
                .push(format!("address 0x{:08X} is not in RAM or ROM", start_addr));
            return result;
        }

        let memory = self.cpu.memory_mut();
        memory.reset();
        let stored = memory.load(&result.machine_code, start_addr);
        memory.write32(RESET_VECTOR, start_addr);
        self.reset();

        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(stored as u32);
        result
    }

    /// Disassemble up to `num_instructions` starting at `start_addr`, one
    /// line of text per instruction
    ///
    /// At most 64 KiB of memory is read, which bounds the listing length.
    pub fn disassemble(&self, start_addr: u32, num_instructions: u32) -> String {
        let count = usize::try_from(num_instructions).unwrap_or(usize::MAX);
        let len = count
            .saturating_mul(MAX_INSTRUCTION_SIZE)
            .min(DISASSEMBLY_WINDOW_LIMIT);
        let window = self.cpu.memory().dump(start_addr, len);
        disassemble(&window, start_addr)
            .iter()
            .take(count)
            .map(|instr| format!("{:08X}  {}", instr.address, format_instruction(instr)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u32 {
        self.program_start
    }

    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u32 {
        self.program_end
    }
}
