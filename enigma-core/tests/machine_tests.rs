#![allow(missing_docs)]
use enigma_core::api::MachineSettings;
use enigma_core::{
    ConfigurationError, EnigmaConfig, EnigmaMachine, PlugboardConnection, RotorConfig, RotorType,
};

fn config(rotors: &[(RotorType, u8, u8)], plugs: &[(char, char)]) -> EnigmaConfig {
    EnigmaConfig {
        rotors: rotors
            .iter()
            .map(|&(rotor_type, position, ring)| RotorConfig::new(rotor_type, position, ring))
            .collect(),
        plugboard: plugs
            .iter()
            .map(|&(a, b)| PlugboardConnection::new(a, b))
            .collect(),
        ..EnigmaConfig::default()
    }
}

#[test]
fn test_default_vector() {
    let mut machine = EnigmaMachine::new(&EnigmaMachine::create_default_config()).unwrap();
    assert_eq!(machine.encode("A"), "B");

    let mut machine = EnigmaMachine::default();
    assert_eq!(machine.encode("AAAAA"), "BDZGO");
    assert_eq!(machine.rotor_window(), "AAF");
}

#[test]
fn test_ring_settings_vector() {
    let key = config(
        &[(RotorType::III, 0, 1), (RotorType::II, 0, 1), (RotorType::I, 0, 1)],
        &[],
    );
    let mut machine = EnigmaMachine::new(&key).unwrap();
    assert_eq!(machine.encode("AAAAA"), "EWTYX");
}

#[test]
fn test_plugboard_vector() {
    let key = config(
        &[(RotorType::III, 0, 0), (RotorType::II, 0, 0), (RotorType::I, 0, 0)],
        &[('A', 'B'), ('C', 'D')],
    );
    let mut machine = EnigmaMachine::new(&key).unwrap();
    assert_eq!(machine.encode("ENIGMA"), "FQGBHY");
}

#[test]
fn test_full_key_vector_and_reciprocity() {
    // Left to right: II IV V, rings 1 5 12, start QEV, plugs AQ EP TZ.
    let key = config(
        &[(RotorType::V, 21, 11), (RotorType::IV, 4, 4), (RotorType::II, 16, 0)],
        &[('A', 'Q'), ('E', 'P'), ('T', 'Z')],
    );
    let mut sender = EnigmaMachine::new(&key).unwrap();
    let ciphertext = sender.encode("THEQUICKBROWNFOX");
    assert_eq!(ciphertext, "GSIRKEUPPZNOSTUY");
    assert_eq!(sender.rotor_window(), "QFL");

    let mut receiver = EnigmaMachine::new(&key).unwrap();
    assert_eq!(receiver.encode(&ciphertext), "THEQUICKBROWNFOX");
}

#[test]
fn test_reciprocity_across_many_starts() {
    let plaintext = "ANGRIFFXUNTERNEHMENXNORDWESTXVONXKIEW";
    for rotor_start in [0u8, 4, 16, 21, 25] {
        let key = config(
            &[
                (RotorType::I, rotor_start, 3),
                (RotorType::V, (rotor_start * 7) % 26, 0),
                (RotorType::III, (rotor_start * 3) % 26, 25),
            ],
            &[('K', 'O'), ('B', 'Y'), ('X', 'E')],
        );
        let ciphertext = EnigmaMachine::new(&key).unwrap().encode(plaintext);
        assert_ne!(ciphertext, plaintext);
        let decoded = EnigmaMachine::new(&key).unwrap().encode(&ciphertext);
        assert_eq!(decoded, plaintext, "start {rotor_start}");
    }
}

#[test]
fn test_no_letter_encodes_to_itself() {
    let mut machine = EnigmaMachine::default();
    for _ in 0..200 {
        assert_ne!(machine.encode_char('E'), 'E');
    }
}

#[test]
fn test_non_letters_pass_through_without_stepping() {
    let mut machine = EnigmaMachine::default();
    let before = machine.state();
    assert_eq!(machine.encode_char(','), ',');
    assert_eq!(machine.encode_char(' '), ' ');
    assert_eq!(machine.encode_char('7'), '7');
    assert_eq!(machine.state(), before);

    let mut machine = EnigmaMachine::default();
    assert_eq!(machine.encode("HELLO, WORLD!"), "ILBDA, AMTAZ!");
    // Ten letters, ten steps.
    assert_eq!(machine.state().rotors[0].position, 10);
    assert_eq!(machine.rotor_window(), "AAK");
}

#[test]
fn test_encode_upper_cases_input() {
    let mut machine = EnigmaMachine::default();
    assert_eq!(machine.encode("hello"), "ILBDA");
}

#[test]
fn test_state_persists_across_calls() {
    let mut machine = EnigmaMachine::default();
    let joined = format!("{}{}", machine.encode("AAA"), machine.encode("AA"));
    assert_eq!(joined, "BDZGO");
}

#[test]
fn test_double_step_at_middle_notch() {
    // Left I at A, middle II at its notch E, right III at U.
    let key = config(
        &[(RotorType::III, 20, 0), (RotorType::II, 4, 0), (RotorType::I, 0, 0)],
        &[],
    );
    let mut machine = EnigmaMachine::new(&key).unwrap();

    machine.encode_char('A');
    assert_eq!(machine.rotor_window(), "BFV");

    machine.encode_char('A');
    assert_eq!(machine.rotor_window(), "BGW");
}

#[test]
fn test_plugboard_stage_is_an_involution() {
    let key = config(&[], &[('A', 'B'), ('C', 'D')]);
    let machine = EnigmaMachine::new(&key).unwrap();
    let state = machine.state();
    let board = enigma_core::plugboard::Plugboard::from_connections(&state.plugboard).unwrap();
    for letter in 'A'..='Z' {
        assert_eq!(board.swap_letter(board.swap_letter(letter)), letter);
    }
}

#[test]
fn test_double_mapped_plug_fails() {
    let key = config(
        &[(RotorType::III, 0, 0)],
        &[('A', 'B'), ('A', 'C')],
    );
    assert!(matches!(
        EnigmaMachine::new(&key),
        Err(ConfigurationError::LetterAlreadyConnected { letter: 'A', .. })
    ));
}

#[test]
fn test_out_of_range_rotor_values_fail() {
    let key = config(&[(RotorType::III, 0, 30)], &[]);
    assert_eq!(
        EnigmaMachine::new(&key).unwrap_err(),
        ConfigurationError::RingSettingOutOfRange { slot: 0, value: 30 }
    );

    let key = config(&[(RotorType::III, 0, 0), (RotorType::II, 26, 0)], &[]);
    assert_eq!(
        EnigmaMachine::new(&key).unwrap_err(),
        ConfigurationError::PositionOutOfRange { slot: 1, value: 26 }
    );
}

#[test]
fn test_rotor_period() {
    let mut machine = EnigmaMachine::default();
    for _ in 0..26 {
        machine.step();
    }
    // Right rotor is back at A; it passed V once and carried the middle rotor.
    assert_eq!(machine.rotor_window(), "ABA");

    let mut machine = EnigmaMachine::default();
    for _ in 0..26 * 26 {
        machine.step();
    }
    // The middle rotor is back at B after its double step at E turned the left rotor once.
    assert_eq!(machine.rotor_window(), "BBA");
}

#[test]
fn test_only_three_rotors_step() {
    let key = config(
        &[
            (RotorType::III, 21, 0),
            (RotorType::II, 4, 0),
            (RotorType::I, 0, 0),
            (RotorType::IV, 7, 0),
        ],
        &[],
    );
    let mut machine = EnigmaMachine::new(&key).unwrap();
    let windows: Vec<String> = (0..3)
        .map(|_| {
            machine.step();
            machine.rotor_window()
        })
        .collect();
    assert_eq!(windows, ["HBFW", "HBFX", "HBFY"]);
}

#[test]
fn test_single_rotor_machine() {
    let key = config(&[(RotorType::I, 0, 0)], &[]);
    let mut machine = EnigmaMachine::new(&key).unwrap();
    assert_eq!(machine.encode("AAAA"), "NRNL");
    assert_eq!(machine.rotor_window(), "E");
}

#[test]
fn test_settings_and_config_agree() {
    let settings = MachineSettings {
        rotor_sequence: vec!["I".into(), "II".into(), "III".into()],
        reflector: "B".into(),
        ring_setting: vec![2, 2, 2],
        initial_positions: "AAA".into(),
        plug_combinations: Vec::new(),
    };
    let key = EnigmaConfig::try_from(&settings).unwrap();
    assert_eq!(EnigmaMachine::new(&key).unwrap().encode("AAAAA"), "EWTYX");
    assert_eq!(MachineSettings::from(&key), settings);
}
