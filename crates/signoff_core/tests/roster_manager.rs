use signoff_core::{
    compute_stats, AttendeeSlot, MeetingInfo, RosterManager, SignatureBlob, SlotId, SlotPatch,
};

fn blob() -> SignatureBlob {
    SignatureBlob::from_raw(r#"{"paths":["M1.00,1.00 L2.00,2.00"],"timestamp":1}"#)
}

fn complete_meeting() -> MeetingInfo {
    let mut meeting = MeetingInfo::new("2025-03-05");
    meeting.location = "Warehouse B".to_string();
    meeting.facilitator = "Jordan Lee".to_string();
    meeting.topic = "Forklift Safety".to_string();
    meeting
}

#[test]
fn generate_produces_exact_count_of_blank_present_slots() {
    let mut roster = RosterManager::new();
    for count in 1..=50u32 {
        let slots = roster.generate_roster(count, "2025-03-05");
        assert_eq!(slots.len(), count as usize);
        for (index, slot) in slots.iter().enumerate() {
            assert_eq!(slot.id, SlotId::from_position(index + 1));
            assert!(slot.is_present);
            assert!(slot.name.is_empty());
            assert_eq!(slot.date, "2025-03-05");
            assert!(slot.signature.is_none());
            assert!(slot.absent_reason.is_none());
        }
    }
}

#[test]
fn toggling_presence_clears_signature_and_reason() {
    let mut roster = RosterManager::new();
    roster.generate_roster(2, "2025-03-05");
    let id = SlotId::from_position(1);

    roster.set_signature(&id, blob());
    let slot = roster.toggle_presence(&id).unwrap();
    assert!(!slot.is_present);
    assert!(slot.signature.is_none());

    roster.update_slot(&id, SlotPatch::absent_reason("Vacation"));
    let slot = roster.toggle_presence(&id).unwrap();
    assert!(slot.is_present);
    assert!(slot.absent_reason.is_none());
    assert!(slot.signature.is_none());
}

#[test]
fn stats_invariants_hold_for_mixed_rosters() {
    let meeting = MeetingInfo::new("2025-03-05");
    let mut roster = RosterManager::new();
    roster.generate_roster(8, "2025-03-05");

    // Cycle each slot through unfilled / signed / unsigned / absent.
    for position in 1..=8 {
        let id = SlotId::from_position(position);
        match position % 4 {
            0 => {}
            1 => {
                roster.update_slot(&id, SlotPatch::name(format!("Signed {position}")));
                roster.set_signature(&id, blob());
            }
            2 => {
                roster.update_slot(&id, SlotPatch::name(format!("Unsigned {position}")));
            }
            _ => {
                roster.update_slot(&id, SlotPatch::name(format!("Away {position}")));
                roster.toggle_presence(&id);
            }
        }
    }

    let stats = compute_stats(roster.slots(), &meeting);
    assert!(stats.signed_count <= stats.present_count);
    assert!(stats.present_count <= stats.filled_names);
    assert!(stats.filled_names <= meeting.expected_count as usize);
    assert_eq!(stats.absent_count + stats.present_count, stats.filled_names);
    assert_eq!(stats.filled_names, 6);
    assert_eq!(stats.signed_count, 2);
    assert_eq!(stats.absent_count, 2);
}

#[test]
fn whitespace_names_do_not_count_as_filled() {
    let mut slot = AttendeeSlot::new(SlotId::from_position(1), "2025-03-05");
    slot.apply(SlotPatch::name("   "));
    let stats = compute_stats(&[slot], &complete_meeting());
    assert_eq!(stats.filled_names, 0);
    assert!(!stats.is_complete);
}

#[test]
fn complete_requires_all_present_signed_and_metadata() {
    let meeting = complete_meeting();
    let mut roster = RosterManager::new();
    roster.generate_roster(3, "2025-03-05");
    for position in 1..=3 {
        let id = SlotId::from_position(position);
        roster.update_slot(&id, SlotPatch::name(format!("Worker {position}")));
    }
    roster.set_signature(&SlotId::from_position(1), blob());
    roster.set_signature(&SlotId::from_position(2), blob());

    // signed=2, present=3
    assert!(!roster.stats(&meeting).is_complete);

    roster.set_signature(&SlotId::from_position(3), blob());
    assert!(roster.stats(&meeting).is_complete);

    let mut missing_topic = meeting.clone();
    missing_topic.topic.clear();
    assert!(!roster.stats(&missing_topic).is_complete);
}

#[test]
fn nobody_present_is_never_complete() {
    let meeting = complete_meeting();
    let mut roster = RosterManager::new();
    roster.generate_roster(2, "2025-03-05");

    // signed=0, present=0 with an empty roster
    assert!(!roster.stats(&meeting).is_complete);

    let id = SlotId::from_position(1);
    roster.update_slot(&id, SlotPatch::name("Carol"));
    roster.toggle_presence(&id);
    let stats = roster.stats(&meeting);
    assert_eq!((stats.signed_count, stats.present_count), (0, 0));
    assert!(!stats.is_complete);
}

#[test]
fn signature_on_absent_slot_is_dropped() {
    let mut roster = RosterManager::new();
    roster.generate_roster(1, "2025-03-05");
    let id = SlotId::from_position(1);
    roster.update_slot(&id, SlotPatch::presence(false));

    let slot = roster.set_signature(&id, blob()).unwrap();
    assert!(slot.signature.is_none());
    assert!(!slot.is_signed());
}
