use basalt_chunk::{ChannelCompression, ChannelDepth, VoxelBuf, VoxelChannel};
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(sx in dim(), sy in dim(), sz in dim()) {
        let buf = VoxelBuf::new(sx, sy, sz);
        let expect = sx * sy * sz;
        prop_assert_eq!(buf.volume(), expect);

        let mut seen = vec![false; expect];
        for z in 0..sz { for x in 0..sx { for y in 0..sy {
            let i = buf.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // strides agree with idx: stepping one voxel moves the flat index by the stride
    #[test]
    fn strides_match_idx(sx in 2usize..=8, sy in 2usize..=8, sz in 2usize..=8) {
        let buf = VoxelBuf::new(sx, sy, sz);
        let (jx, jy, jz) = buf.strides();
        prop_assert_eq!(buf.idx(1, 0, 0), jx);
        prop_assert_eq!(buf.idx(0, 1, 0), jy);
        prop_assert_eq!(buf.idx(0, 0, 1), jz);
        prop_assert_eq!(buf.idx(1, 1, 1), jx + jy + jz);
    }

    // u16 channel round-trips through the byte view in flat-index order
    #[test]
    fn u16_channel_roundtrip(sx in dim(), sy in dim(), sz in dim()) {
        let mut buf = VoxelBuf::new(sx, sy, sz);
        let values: Vec<u16> = (0..buf.volume()).map(|i| (i * 7 % 65_536) as u16).collect();
        buf.set_channel_u16(VoxelChannel::Type, &values);

        prop_assert_eq!(buf.channel_depth(VoxelChannel::Type), ChannelDepth::Bits16);
        prop_assert_eq!(buf.channel_compression(VoxelChannel::Type), ChannelCompression::Raw);

        let bytes = buf.channel_as_bytes(VoxelChannel::Type).unwrap();
        prop_assert_eq!(bytes.len(), buf.volume() * 2);
        for (i, v) in values.iter().enumerate() {
            let got = u16::from_ne_bytes([bytes[i * 2], bytes[i * 2 + 1]]);
            prop_assert_eq!(got, *v);
        }
    }

    // u8 channel keeps bytes verbatim
    #[test]
    fn u8_channel_roundtrip(sx in dim(), sy in dim(), sz in dim()) {
        let mut buf = VoxelBuf::new(sx, sy, sz);
        let values: Vec<u8> = (0..buf.volume()).map(|i| (i % 251) as u8).collect();
        buf.set_channel_u8(VoxelChannel::Type, &values);
        prop_assert_eq!(buf.channel_depth(VoxelChannel::Type), ChannelDepth::Bits8);
        prop_assert_eq!(buf.channel_as_bytes(VoxelChannel::Type).unwrap(), &values[..]);
    }
}

#[test]
fn new_buffer_is_uniform_air() {
    let buf = VoxelBuf::new(4, 4, 4);
    assert_eq!(
        buf.channel_compression(VoxelChannel::Type),
        ChannelCompression::Uniform
    );
    assert_eq!(buf.channel_uniform_value(VoxelChannel::Type), 0);
    assert!(buf.channel_as_bytes(VoxelChannel::Type).is_none());
}

#[test]
fn make_uniform_drops_storage() {
    let mut buf = VoxelBuf::new(2, 2, 2);
    buf.set_channel_u8(VoxelChannel::Type, &[1; 8]);
    buf.make_uniform(VoxelChannel::Type, 5);
    assert_eq!(
        buf.channel_compression(VoxelChannel::Type),
        ChannelCompression::Uniform
    );
    assert_eq!(buf.channel_uniform_value(VoxelChannel::Type), 5);
    assert!(buf.channel_as_bytes(VoxelChannel::Type).is_none());
}

#[test]
fn palette_channel_exposes_no_bytes() {
    let mut buf = VoxelBuf::new(2, 2, 2);
    buf.set_channel_palette(VoxelChannel::Type, ChannelDepth::Bits16, vec![0, 1, 2]);
    assert_eq!(
        buf.channel_compression(VoxelChannel::Type),
        ChannelCompression::Palette
    );
    assert!(buf.channel_as_bytes(VoxelChannel::Type).is_none());
}
